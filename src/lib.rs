//! `quicklook` samples simulation datasets onto regular grids and stores the
//! results for fast inspection
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use quicklook_utils as utils;

#[cfg(feature = "dataset")]
#[cfg_attr(docsrs, doc(cfg(feature = "dataset")))]
#[doc(inline)]
pub use quicklook_dataset as dataset;

#[cfg(feature = "sampler")]
#[cfg_attr(docsrs, doc(cfg(feature = "sampler")))]
#[doc(inline)]
pub use quicklook_sampler as sampler;
