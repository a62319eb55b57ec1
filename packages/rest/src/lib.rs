//! # firebase-rest
//!
//! A fluent client for Firebase Realtime Database locations over REST.
//!
//! A [`Reference`] addresses one location in the remote JSON tree and maps
//! its operations onto HTTP requests against `<location>.json`:
//!
//! | Operation            | Method   |
//! |----------------------|----------|
//! | [`Reference::value`] | `GET`    |
//! | [`Reference::write`] | `PUT`    |
//! | [`Reference::push`]  | `POST`   |
//! | [`Reference::update`]| `PATCH`  |
//! | [`Reference::delete`]| `DELETE` |
//!
//! ```ignore
//! use firebase_rest::Reference;
//!
//! let people = Reference::new("https://my-app.firebaseio.com/people")
//!     .auth(secret)
//!     .export(true);
//!
//! let fred: Person = people.child("fred").value()?;
//! people.child("fred").update(&serde_json::json!({"last": "Smith"}))?;
//! ```
//!
//! Requests go through an [`HttpExecutor`]. [`Reference::new`] installs a
//! [`ReqwestExecutor`]; use [`Reference::with_executor`] to supply another,
//! for example one with a custom timeout.

pub mod error;
pub mod executor;
pub mod query;
pub mod types;

mod reference;

pub use error::{Error, Result};
pub use executor::{HttpExecutor, ReqwestExecutor, TransportError};
pub use reference::Reference;
pub use types::{HttpRequest, HttpResponse, Method, PushId};
