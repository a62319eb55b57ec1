//! A handle onto one location of a remote JSON tree.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::query;
use crate::types::{HttpRequest, HttpResponse, Method, PushId};

const TEMPORARY_REDIRECT: u16 = 307;

/// A location in a Firebase Realtime Database, addressed over REST.
///
/// Every operation issues one request against `<url>.json` and returns:
/// - `value` performs a GET and decodes the body
/// - `write` performs a PUT (replace)
/// - `push` performs a POST (append under a minted key)
/// - `update` performs a PATCH (merge top-level keys)
/// - `delete` performs a DELETE
///
/// Configuration methods consume the handle and return it, so a configured
/// `Reference` cannot change under an in-flight request. Use [`child`] or
/// `clone` to get independently configured handles.
///
/// # Example
///
/// ```ignore
/// use firebase_rest::Reference;
///
/// let users = Reference::new("https://my-app.firebaseio.com/users").auth(secret);
///
/// let fred: User = users.child("fred").value()?;
/// let key = users.push(&new_user)?;
/// users.child(key.as_str()).update(&serde_json::json!({"active": true}))?;
/// ```
///
/// [`child`]: Reference::child
#[derive(Clone)]
pub struct Reference {
    url: String,
    token: Option<String>,
    export: bool,
    request_delay: Option<Duration>,
    executor: Arc<dyn HttpExecutor>,
}

impl Reference {
    /// Create a reference for `url` with its own default HTTP executor.
    ///
    /// No network I/O happens until an operation is called.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_executor(url, Arc::new(ReqwestExecutor::default()))
    }

    /// Create a reference that sends its requests through `executor`.
    pub fn with_executor(url: impl Into<String>, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            url: url.into(),
            token: None,
            export: false,
            request_delay: None,
            executor,
        }
    }

    /// Authenticate every request with a database secret or ID token.
    ///
    /// Replaces any previous token. An empty token disables the parameter.
    pub fn auth(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|token| !token.is_empty());
        self
    }

    /// Ask the store to include priority metadata in read responses.
    pub fn export(mut self, toggle: bool) -> Self {
        self.export = toggle;
        self
    }

    /// Pause for `delay` before each request, to stay under rate limits.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = Some(delay).filter(|delay| !delay.is_zero());
        self
    }

    /// Derive a reference to `segment` below this location.
    ///
    /// The child starts with this reference's token, export flag and delay,
    /// and shares its executor. Nothing else is shared.
    pub fn child(&self, segment: &str) -> Reference {
        Reference {
            url: query::join(&self.url, segment),
            token: self.token.clone(),
            export: self.export,
            request_delay: self.request_delay,
            executor: Arc::clone(&self.executor),
        }
    }

    /// The location this reference addresses, without suffix or query.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The full URL every operation on this reference targets.
    pub fn request_url(&self) -> String {
        query::request_url(&self.url, self.token.as_deref(), self.export)
    }

    /// Read the value at this location.
    pub fn value<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.execute_request(Method::GET, None)?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    /// Read the value at this location into `target`.
    ///
    /// `target` is only replaced when the request and decoding both succeed.
    pub fn value_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<()> {
        *target = self.value()?;
        Ok(())
    }

    /// Read the undecoded body returned for this location.
    pub fn value_raw(&self) -> Result<Vec<u8>> {
        self.execute_request(Method::GET, None)
    }

    /// Replace the value at this location.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let body = serde_json::to_vec(value).map_err(Error::Encode)?;
        self.execute_request(Method::PUT, Some(body))?;
        Ok(())
    }

    /// Append `value` under a new store-generated key and return that key.
    pub fn push<T: Serialize + ?Sized>(&self, value: &T) -> Result<PushId> {
        let body = serde_json::to_vec(value).map_err(Error::Encode)?;
        let response = self.execute_request(Method::POST, Some(body))?;
        serde_json::from_slice(&response).map_err(Error::Decode)
    }

    /// Merge the top-level keys of `value` into the stored object.
    pub fn update<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let body = serde_json::to_vec(value).map_err(Error::Encode)?;
        self.execute_request(Method::PATCH, Some(body))?;
        Ok(())
    }

    /// Remove the value at this location and everything below it.
    pub fn delete(&self) -> Result<()> {
        self.execute_request(Method::DELETE, None)?;
        Ok(())
    }

    /// Send one request and return the body of a 2xx response.
    fn execute_request(&self, method: Method, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let mut request = HttpRequest::new(method, self.request_url());
        if let Some(body) = body {
            request = request.with_json_body(body);
        }

        if let Some(delay) = self.request_delay {
            thread::sleep(delay);
        }

        log::debug!("{} {}{}", method, self.url, query::PATH_SUFFIX);
        let mut response = self.send(&request)?;

        // A single replay against Location; a second 307 is reported as-is.
        if response.status == TEMPORARY_REDIRECT {
            if let Some(location) = response.header("location").map(str::to_string) {
                log::debug!("{} {} redirected, replaying once", method, self.url);
                request.url = resolve_location(&request.url, &location)?;
                response = self.send(&request)?;
            }
        }

        if !response.is_success() {
            log::warn!(
                "{} {} failed: {} {}",
                method,
                self.url,
                response.status,
                response.status_text
            );
            return Err(Error::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }

        Ok(response.body)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.executor.execute(request).map_err(Error::Transport)
    }
}

/// Resolve a possibly relative `Location` against the URL that produced it.
fn resolve_location(request_url: &str, location: &str) -> Result<String> {
    let resolved = Url::parse(request_url)
        .and_then(|base| base.join(location))
        .map_err(|e| Error::Transport(Box::new(e)))?;
    Ok(resolved.into())
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("url", &self.url)
            .field("auth", &self.token.as_ref().map(|_| "<redacted>"))
            .field("export", &self.export)
            .field("request_delay", &self.request_delay)
            .finish_non_exhaustive()
    }
}
