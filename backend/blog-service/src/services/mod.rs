/// Business logic layer
///
/// - `publishing`: post creation, publish toggling, cascade deletion
/// - `moderation`: the admin comment queue and dashboard
/// - `generation`: AI draft generation with bounded retry
/// - `media`: image upload and delivery-URL derivation
pub mod generation;
pub mod media;
pub mod moderation;
pub mod publishing;

pub use generation::{GeminiClient, GenerationBackend, GenerationError, GenerationService};
pub use media::{ImageKitClient, MediaError, MediaPublisher, UploadedAsset};
pub use moderation::ModerationService;
pub use publishing::PublishingService;
