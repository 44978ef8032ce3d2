use service::{catalog::CatalogService, directory::DirectoryService};

#[derive(Clone)]
pub struct CustomerState {
    pub directory: DirectoryService,
}

#[derive(Clone)]
pub struct RentalState {
    pub catalog: CatalogService,
}
