//! # nxdl-doctools
//!
//! Documentation build tools for the NXDL schema of the NeXus
//! scientific data format.
//!
//! Two utilities support the out-of-source build of the NeXus manual:
//!
//! - The **schema document generator** parses the NXDL Schema file
//!   (`nxdl.xsd`), walks its constructs, and emits the
//!   "NXDL Elements and Data Types" chapter as reStructuredText,
//!   interleaving the documentation blocks embedded in the schema's
//!   annotation nodes.
//! - The **resource replication** utility copies the fixed set of
//!   definition-tree resources the build needs into the build
//!   directory.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nxdl_doctools::generator;
//!
//! let chapter = generator::generate("nxdl.xsd")?;
//! print!("{}", chapter);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub mod documents;
pub mod xpath;

pub mod docs;
pub mod output;
pub mod generator;

pub mod replicate;

// Re-exports for convenience
pub use error::{Error, Result};
pub use generator::DocGenerator;

/// Version of the nxdl-doctools crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace used by the NXDL schema files
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
