//! Text rewriting rules for restyle.
//!
//! Each rule is a pure `&str -> String` transform that leaves text already
//! in the target style unchanged:
//! - Identifier renaming (camelCase to snake_case, leading to trailing underscore)
//! - Prefix increment in `for` headers
//! - C-style to C++-style comments
//! - Include path resolution and sorting
//! - Include guard naming

pub mod comments;
pub mod guard;
pub mod identifiers;
pub mod includes;
pub mod loops;

pub use comments::convert_comments;
pub use guard::{fix_include_guard, guard_token};
pub use identifiers::{decamelize, move_underscore};
pub use includes::{
	AmbiguousReorder, IncludeDirective, IncludeKind, prefix_legacy_paths, resolve_header_paths,
	sort_includes,
};
pub use loops::prefix_loop_increment;
