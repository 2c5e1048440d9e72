//! confstash — trivially persist application settings
//!
//! A [`ConfigStore`] is a key-value bag saved as one JSON document under the
//! user's config directory. Values can be any [`Value`] kind, arbitrarily
//! nested; tuples, sets, and byte strings round-trip losslessly through
//! tagged wrapper objects (see [`codec`]). Forms can mirror their widget
//! values into the same file through [`forms::FormMirror`].
//!
//! ```no_run
//! use confstash::{ConfigStore, Value};
//!
//! let mut store = ConfigStore::open("myapp", "settings")?;
//! let volume = store.get_or_insert("volume", 80).clone();
//! store.set("window", Value::Tuple(vec![Value::Int(800), Value::Int(600)]));
//! store.save()?;
//! # Ok::<(), confstash::ConfigError>(())
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod forms;
pub mod store;
pub mod value;

pub use error::ConfigError;
pub use forms::{FormMirror, WidgetValue};
pub use store::ConfigStore;
pub use value::Value;
