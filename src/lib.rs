//! # mdaguard
//!
//! In-process authentication and authorization guard. A [`Guard`] is built
//! from a [`GuardConfig`] naming which of four modules to construct:
//!
//! - **core**: credential registration and password login
//! - **session**: opaque server-side sessions with expiry
//! - **token**: HS256-signed self-contained tokens
//! - **authorization**: per-subject role sets
//!
//! Calls into a module the guard was not built with return
//! [`ModuleOutcome::Unavailable`], except `login`/`register`, which fail
//! with an error because credential checking is the baseline capability.
//!
//! ```no_run
//! use mdaguard::{Guard, GuardConfig, ModuleFlags};
//!
//! # async fn demo() -> mdaguard::AppResult<()> {
//! let guard = Guard::new(
//!     GuardConfig::default()
//!         .with_modules(ModuleFlags::all())
//!         .with_token_secret("change-me"),
//! )?;
//!
//! guard.register("a@x.com", "pw1").await?;
//! assert!(guard.login("a@x.com", "pw1").await?);
//! let session = guard.create_session("a@x.com").await?;
//! # Ok(())
//! # }
//! ```

pub mod guard;
pub mod logging;
pub mod outcome;

pub use guard::{Guard, GuardBuilder};
pub use outcome::ModuleOutcome;

pub use mdaguard_auth::{Claims, Session, TokenRejection, VerifiedToken};
pub use mdaguard_core::config::{GuardConfig, ModuleFlags};
pub use mdaguard_core::error::{AppError, ErrorKind};
pub use mdaguard_core::result::AppResult;
pub use mdaguard_core::traits::{Clock, CredentialHasher, KeyValueStore, ManualClock, SystemClock};
pub use mdaguard_core::types::{GuardModule, Role, SessionId, SubjectId, parse_ttl};
