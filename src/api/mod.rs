//! Builder-style entry points.
//!
//! ```no_run
//! let seed = stegmedia::api::hide::prepare()
//!     .with_seed("super secret")
//!     .with_message("Hello, World!")
//!     .with_media("carrier.png")
//!     .with_output("carrier-with-secret.png")
//!     .execute()
//!     .expect("Failed to hide message");
//!
//! let text = stegmedia::api::unveil::prepare()
//!     .with_seed(&seed.to_string())
//!     .with_secret_media("carrier-with-secret.png")
//!     .execute()
//!     .expect("Failed to unveil message")
//!     .into_text()
//!     .expect("Payload was not text");
//! ```

pub mod hide;
pub mod unveil;
