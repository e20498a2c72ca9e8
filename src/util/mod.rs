mod result_ext;
pub use result_ext::*;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[derive(thiserror::Error, Debug)]
#[error("javascript error: {0}")]
pub struct JsError(String);

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl From<wasm_bindgen::JsValue> for JsError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		JsError(format!("{:?}", value))
	}
}
