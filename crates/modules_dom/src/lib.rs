//! DOM shim for `deno_core`
//!
//! Installs `console`, `document` and `Node` as globals and routes every call
//! through `op_dom_call` to a [`shim_core::Bridge`] kept in `OpState`.
//!
//! Usage:
//!   const links = document.querySelectorAll('a')
//!   console.log(links.map((n) => n.getAttribute('href')))

use std::rc::Rc;

use serde_json::Value;
use shim_core::Bridge;

mod ops;
mod runtime;

pub use runtime::{RuntimeError, ShimRuntime};

/// Host bridge as stored in `OpState`. Handles crossing into V8 are JSON.
pub type HostBridge = Rc<dyn Bridge<Handle = Value>>;

/// Which capabilities the installed globals expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// `console.log`, `document.querySelectorAll`, `Node#getAttribute`.
    #[default]
    Full,
    /// Same globals without `Node#getAttribute`.
    QueryOnly,
}

impl Surface {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Surface::Full),
            "query-only" => Some(Surface::QueryOnly),
            _ => None,
        }
    }

    fn strip_script(self) -> Option<&'static str> {
        match self {
            Surface::Full => None,
            Surface::QueryOnly => Some("delete globalThis.Node.prototype.getAttribute;"),
        }
    }
}

deno_core::extension!(
    dom_shim,
    ops = [ops::op_dom_call],
    esm_entry_point = "ext:dom_shim/dom.js",
    esm = [ dir "src", "dom.js" ],
    options = {
        host: HostBridge,
    },
    state = |state, options| {
        state.put(options.host);
    },
);

/// Register the DOM shim extension over `host`.
pub fn init(host: HostBridge) -> deno_core::Extension {
    dom_shim::init(host)
}
