use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use world_archive_core::{LoadError, Resource};

/// Best-effort text for a rejected promise or thrown value.
pub fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// GET a same-origin JSON document and decode it.
pub async fn fetch_json<T: DeserializeOwned>(resource: Resource) -> Result<T, LoadError> {
    let path = resource.file_name();
    let window = web_sys::window().ok_or_else(|| LoadError::network(path, "no window"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts)
        .map_err(|error| LoadError::network(path, describe(&error)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|error| LoadError::network(path, describe(&error)))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| LoadError::network(path, "not a Response"))?;

    if !response.ok() {
        return Err(LoadError::Status {
            resource: path.to_string(),
            status: response.status(),
        });
    }

    let body = response
        .json()
        .map_err(|error| LoadError::decode(path, describe(&error)))?;
    let json = JsFuture::from(body)
        .await
        .map_err(|error| LoadError::decode(path, describe(&error)))?;

    serde_wasm_bindgen::from_value::<T>(json)
        .map_err(|error| LoadError::decode(path, error.to_string()))
}
