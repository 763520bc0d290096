pub mod artifacts;
pub mod categorize;
#[cfg(feature = "browser")]
pub mod collect;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod note;
#[cfg(feature = "browser")]
pub mod pacing;
pub mod render;
#[cfg(feature = "browser")]
pub mod session;

pub use artifacts::{
    BUCKETS_FILE, MINDMAP_FILE, default_output_dir, load_buckets, load_notes, resolve_input,
    save_buckets, save_notes, save_text,
};
pub use categorize::{Buckets, categorize};
#[cfg(feature = "browser")]
pub use collect::{Browse, Collector, CollectorConfig, HOME_URL};
pub use error::{Result, TripnotesError};
pub use extract::extract_cards;
pub use keywords::{KeywordConfig, UNCATEGORIZED};
pub use note::{NoteRecord, dedup_by_title};
#[cfg(feature = "browser")]
pub use pacing::PacingPolicy;
pub use render::{build_mindmap, build_report, category_icon, sanitize_label};
#[cfg(feature = "browser")]
pub use session::{Session, SessionConfig};
