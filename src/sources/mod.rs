pub mod json;
pub mod supabase;
pub mod traits;

pub use json::{load_services, JsonFileStore, MemoryStore};
pub use supabase::SupabaseStore;
pub use traits::ListingStore;
