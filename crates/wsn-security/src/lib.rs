//! `wsn-security`: demonstration-only security helpers.
//!
//! Nothing in this crate provides a security property.  The cipher is a
//! keyed byte shift, the token carries a fixed fake signature, and the
//! traffic log is random.  They exist to feed the demo front-end.
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`cipher`]  | `encrypt`, `decrypt`, `decrypt_or_notice`           |
//! | [`token`]   | `DemoToken` issue / decode                          |
//! | [`traffic`] | `generate_traffic` synthetic message log            |

pub mod cipher;
pub mod error;
pub mod token;
pub mod traffic;


pub use cipher::{DECRYPT_NOTICE, decrypt, decrypt_or_notice, encrypt};
pub use error::{SecurityError, SecurityResult};
pub use token::{DemoToken, TokenClaims, TokenHeader};
pub use traffic::{TrafficKind, TrafficMessage, generate_traffic};
