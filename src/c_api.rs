// C ABI for hosts that plug the transliterator into their own request and
// title pipelines. Strings returned by this module must be released with
// `pst_free_string`. Every entry point catches panics.
use crate::core::converter::{has_persian_or_arabic, is_latin_slug, transliterate};
use crate::core::resolver::{resolve_taxonomy_slug, TermLookup};
use crate::core::types::Term;
use libc::{c_char, c_int, c_void};
use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use tracing::error;

/// Host callback: returns the stored slug of the matching term as a
/// NUL-terminated string owned by the host (valid until the next call), or
/// null when nothing matches.
pub type PstLookupFn = extern "C" fn(
    user_data: *mut c_void,
    taxonomy: *const c_char,
    key: *const c_char,
) -> *const c_char;

unsafe fn str_arg<'a>(s: *const c_char) -> &'a str {
    if s.is_null() {
        return "";
    }
    CStr::from_ptr(s).to_str().unwrap_or("")
}

fn into_c_string(s: String) -> *mut c_char {
    // Slugs are ASCII; interior NULs can't occur, but stay total anyway.
    CString::new(s).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

#[no_mangle]
pub extern "C" fn pst_transliterate(text: *const c_char) -> *mut c_char {
    let text = unsafe { str_arg(text) };
    let result = catch_unwind(|| transliterate(text));
    match result {
        Ok(slug) => into_c_string(slug),
        Err(_) => {
            error!("panic in pst_transliterate");
            into_c_string(String::new())
        }
    }
}

#[no_mangle]
pub extern "C" fn pst_is_latin_slug(slug: *const c_char) -> c_int {
    let slug = unsafe { str_arg(slug) };
    catch_unwind(|| is_latin_slug(slug)).map_or(0, c_int::from)
}

#[no_mangle]
pub extern "C" fn pst_has_persian_or_arabic(text: *const c_char) -> c_int {
    let text = unsafe { str_arg(text) };
    catch_unwind(|| has_persian_or_arabic(text)).map_or(0, c_int::from)
}

struct CallbackLookup {
    find_by_slug: PstLookupFn,
    find_by_name: PstLookupFn,
    user_data: *mut c_void,
}

impl CallbackLookup {
    fn call(&self, f: PstLookupFn, taxonomy: &str, key: &str) -> Option<Term> {
        let taxonomy_c = CString::new(taxonomy).ok()?;
        let key_c = CString::new(key).ok()?;
        let found = f(self.user_data, taxonomy_c.as_ptr(), key_c.as_ptr());
        if found.is_null() {
            return None;
        }
        let slug = unsafe { CStr::from_ptr(found) }.to_str().ok()?.to_string();
        Some(Term { slug, name: key.to_string() })
    }
}

impl TermLookup for CallbackLookup {
    fn find_by_slug(&self, taxonomy: &str, slug: &str) -> Option<Term> {
        self.call(self.find_by_slug, taxonomy, slug)
    }

    fn find_by_name(&self, taxonomy: &str, name: &str) -> Option<Term> {
        self.call(self.find_by_name, taxonomy, name)
    }
}

/// Resolves a request slug through host callbacks. Returns an empty string
/// when the request should be left unchanged.
#[no_mangle]
pub extern "C" fn pst_resolve_taxonomy_slug(
    incoming_slug: *const c_char,
    taxonomy: *const c_char,
    find_by_slug: PstLookupFn,
    find_by_name: PstLookupFn,
    user_data: *mut c_void,
) -> *mut c_char {
    let incoming_slug = unsafe { str_arg(incoming_slug) };
    let taxonomy = unsafe { str_arg(taxonomy) };
    let lookup = CallbackLookup { find_by_slug, find_by_name, user_data };

    let result = catch_unwind(AssertUnwindSafe(|| resolve_taxonomy_slug(incoming_slug, taxonomy, &lookup)));
    match result {
        Ok(resolved) => into_c_string(resolved.unwrap_or_default()),
        Err(_) => {
            error!("panic in pst_resolve_taxonomy_slug");
            into_c_string(String::new())
        }
    }
}

#[no_mangle]
pub extern "C" fn pst_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(s: *mut c_char) -> String {
        let out = CStr::from_ptr(s).to_str().unwrap().to_string();
        pst_free_string(s);
        out
    }

    #[test]
    fn test_transliterate_roundtrip_through_c() {
        let input = CString::new("سلام دنیا").unwrap();
        let out = unsafe { take(pst_transliterate(input.as_ptr())) };
        assert_eq!(out, "slam-dnya");
        assert_eq!(unsafe { take(pst_transliterate(ptr::null())) }, "");
    }

    #[test]
    fn test_predicates_through_c() {
        let latin = CString::new("abc-1").unwrap();
        let persian = CString::new("سلام").unwrap();
        assert_eq!(pst_is_latin_slug(latin.as_ptr()), 1);
        assert_eq!(pst_is_latin_slug(persian.as_ptr()), 0);
        assert_eq!(pst_is_latin_slug(ptr::null()), 0);
        assert_eq!(pst_has_persian_or_arabic(persian.as_ptr()), 1);
        assert_eq!(pst_has_persian_or_arabic(latin.as_ptr()), 0);
    }

    static NEWS_SLUG: &[u8] = b"news\0";

    extern "C" fn never(_: *mut c_void, _: *const c_char, _: *const c_char) -> *const c_char {
        ptr::null()
    }

    extern "C" fn name_is_akhbar(user_data: *mut c_void, _: *const c_char, key: *const c_char) -> *const c_char {
        let calls = unsafe { &mut *(user_data as *mut usize) };
        *calls += 1;
        let key = unsafe { CStr::from_ptr(key) }.to_str().unwrap();
        if key == "اخبار" {
            NEWS_SLUG.as_ptr() as *const c_char
        } else {
            ptr::null()
        }
    }

    #[test]
    fn test_resolve_through_callbacks() {
        let mut calls: usize = 0;
        let slug = CString::new("اخبار").unwrap();
        let taxonomy = CString::new("category").unwrap();
        let out = pst_resolve_taxonomy_slug(
            slug.as_ptr(),
            taxonomy.as_ptr(),
            never,
            name_is_akhbar,
            &mut calls as *mut usize as *mut c_void,
        );
        assert_eq!(unsafe { take(out) }, "news");
        assert_eq!(calls, 1);

        let latin = CString::new("missing").unwrap();
        let out = pst_resolve_taxonomy_slug(latin.as_ptr(), taxonomy.as_ptr(), never, never, ptr::null_mut());
        assert_eq!(unsafe { take(out) }, "");
    }
}
