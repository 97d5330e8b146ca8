use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};

use anyhow::Context;

use crate::batch::{run_request, SuggestRequest};
use crate::normalize::normalize_string;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    let c = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(c));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

fn take_cstr(ptr: *const c_char, name: &str) -> Result<String, String> {
    if ptr.is_null() {
        return Err(format!("{name} is null"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(|s| s.to_string())
        .map_err(|_| format!("{name} is not valid UTF-8"))
}

fn into_raw(text: String) -> *mut c_char {
    match CString::new(text) {
        Ok(c) => c.into_raw(),
        Err(_) => {
            set_last_error("result contains an interior NUL byte");
            std::ptr::null_mut()
        }
    }
}

fn suggest_json(request: &str) -> anyhow::Result<String> {
    let req = SuggestRequest::from_json(request)?;
    let records = run_request(&req)?;
    serde_json::to_string(&records).context("serialize suggestions")
}

/// Suggest translations for a JSON request (`pairs`, `items`, `lang`, optional `english_field`).
///
/// Returns a JSON array of `[item, suggestion|null]` that must be released with
/// `tt_string_free()`, or null on failure (see `tt_last_error_utf8()`).
#[no_mangle]
pub extern "C" fn tt_suggest_json(request_json: *const c_char) -> *mut c_char {
    let request = match take_cstr(request_json, "request_json") {
        Ok(v) => v,
        Err(e) => {
            set_last_error(&e);
            return std::ptr::null_mut();
        }
    };
    match suggest_json(&request) {
        Ok(json) => {
            clear_last_error();
            into_raw(json)
        }
        Err(err) => {
            set_last_error(&format!("{err:#}"));
            std::ptr::null_mut()
        }
    }
}

/// Normalized grouping key of `text`. Release the result with `tt_string_free()`.
#[no_mangle]
pub extern "C" fn tt_normalize(text: *const c_char) -> *mut c_char {
    match take_cstr(text, "text") {
        Ok(v) => {
            clear_last_error();
            into_raw(normalize_string(&v))
        }
        Err(e) => {
            set_last_error(&e);
            std::ptr::null_mut()
        }
    }
}

/// Releases a string returned by this library. Null is ignored.
#[no_mangle]
pub extern "C" fn tt_string_free(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: non-null pointers handed out by this module come from `CString::into_raw`.
    drop(unsafe { CString::from_raw(ptr) });
}

/// Returns the calling thread's last error message as a UTF-8 C string pointer (or null if none).
/// The pointer is valid until the next call into this library on the same thread.
#[no_mangle]
pub extern "C" fn tt_last_error_utf8() -> *const c_char {
    LAST_ERROR.with(|slot| match slot.borrow().as_ref() {
        Some(s) => s.as_ptr(),
        None => std::ptr::null(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(request: &str) -> Result<String, String> {
        let input = CString::new(request).expect("cstring");
        let out = tt_suggest_json(input.as_ptr());
        if out.is_null() {
            let err = tt_last_error_utf8();
            assert!(!err.is_null());
            return Err(unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned());
        }
        let text = unsafe { CStr::from_ptr(out) }.to_str().expect("utf8").to_string();
        tt_string_free(out);
        Ok(text)
    }

    #[test]
    fn suggest_round_trip() {
        let request = serde_json::json!({
            "pairs": [[null, null], ["simplify $2/4$\n\nhint: the denominator is $2$",
                                     "simplifique $2/4$\n\npista: o denominador é $2$"]],
            "items": ["simplify $3/12$\n\nhint: the denominator is $4$"],
            "lang": "pt"
        });
        let out = call(&request.to_string()).expect("suggest");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(
            value,
            serde_json::json!([[
                "simplify $3/12$\n\nhint: the denominator is $4$",
                "simplifique $3/12$\n\npista: o denominador é $4$"
            ]])
        );
    }

    #[test]
    fn mismatch_sets_last_error() {
        let err = call(r#"{"pairs": [["$a$ ![](x.png)", "$a$ ![](y.png)"]], "items": ["$b$ ![](z.png)"], "lang": "pt"}"#)
            .unwrap_err();
        assert!(err.contains("graphies don't match"), "{err}");
    }

    #[test]
    fn null_input_is_rejected() {
        assert!(tt_suggest_json(std::ptr::null()).is_null());
        assert!(tt_normalize(std::ptr::null()).is_null());
        tt_string_free(std::ptr::null_mut());
    }

    #[test]
    fn normalize_over_ffi() {
        let input = CString::new("**see** $x$").expect("cstring");
        let out = tt_normalize(input.as_ptr());
        assert!(!out.is_null());
        let text = unsafe { CStr::from_ptr(out) }.to_str().expect("utf8").to_string();
        tt_string_free(out);
        assert_eq!(text, "see __MATH__");
    }
}
