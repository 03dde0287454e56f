//! brandkb-core - Core library for brandkb
//!
//! This crate provides the brand knowledge-base store and everything around it:
//!
//! - **types**: Knowledge records, products and brand tones
//! - **store**: Optimistic knowledge store (local cache + remote persistence)
//! - **cache**: Local snapshot cache backends
//! - **remote**: Remote document store backends (SQLite, in-memory)
//! - **wizard**: Analysis → tone → review flow that produces records
//! - **history**: Version listing and record diffs
//! - **share**: Share link encoding

pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod remote;
pub mod share;
pub mod store;
pub mod types;
pub mod wizard;

// Re-export commonly used types
pub use cache::{FileCache, LocalCache, MemoryCache};
pub use config::{SaveFailurePolicy, StoreConfig};
pub use error::{Error, Result};
pub use remote::{DocumentRef, MemoryRemote, RemoteStore};
#[cfg(feature = "sqlite")]
pub use remote::SqliteRemote;
pub use store::{KnowledgeStore, StoreSnapshot};
pub use types::{AnalysisResult, BrandTone, KnowledgeRecord, Product};
pub use wizard::{KnowledgeWizard, WizardStep};
