pub mod fetch;
pub mod template;
pub mod validate;

pub use fetch::{ExplorerClient, ExplorerUdt};
pub use template::{read_template, write_template, ScriptInfo, UdtTemplate};
pub use validate::{validate, ValidationIssue};
