//! Resolver module for output locations.
//!
//! Given a source file, a target format, an optional destination directory and
//! a naming policy, the resolver computes the output path deterministically and
//! creates the destination directory. Directory creation is the only filesystem
//! change made before the transformer runs.
//!
//! # Example
//!
//! ```ignore
//! use docuflow_core::resolver::{NamingPolicy, PathResolver};
//!
//! let resolver = PathResolver::default();
//! let resolved = resolver
//!     .resolve(Path::new("/docs/report.md"), Format::Html, None, NamingPolicy::KeepOriginalStem)
//!     .await?;
//! assert_eq!(resolved.path, PathBuf::from("/docs/report.html"));
//! ```

mod error;
mod path_resolver;
mod types;

pub use error::PathError;
pub use path_resolver::PathResolver;
pub use types::{NamingPolicy, ResolvedOutput};
