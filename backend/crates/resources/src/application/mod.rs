pub mod config;
pub mod create_resource;
pub mod delete_resource;
pub mod download_resource;
pub mod list_resources;
pub mod update_resource;

pub use config::ResourceConfig;
pub use create_resource::CreateResourceUseCase;
pub use delete_resource::DeleteResourceUseCase;
pub use download_resource::DownloadResourceUseCase;
pub use list_resources::ListResourcesUseCase;
pub use update_resource::UpdateResourceUseCase;
