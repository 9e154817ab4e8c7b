//! Page-level wiring of the two independent sections.

use crate::api::{ApiResult, DashboardApi};
use crate::bestsellers::{BestsellersController, MountError};
use crate::catalog::{CatalogControls, CatalogController};
use crate::page::HostPage;
use std::sync::Arc;
use tracing::{info, warn};

/// Both sections of the dashboard page.
///
/// Sections share nothing but the API handle; either may be absent when the
/// host page lacks its elements.
pub struct Dashboard {
    pub catalog: Option<CatalogController>,
    pub bestsellers: Option<BestsellersController>,
    /// Why the bestsellers section did not mount
    pub mount_error: Option<MountError>,
}

impl Dashboard {
    /// Mounts whichever sections the page supports.
    pub fn mount(host: &impl HostPage, api: Arc<dyn DashboardApi>, controls: CatalogControls) -> Self {
        let catalog = CatalogController::mount(host, api.clone(), controls);

        let (bestsellers, mount_error) = match BestsellersController::mount(host, api) {
            Ok(controller) => (Some(controller), None),
            Err(err) => (None, Some(err)),
        };

        Self { catalog, bestsellers, mount_error }
    }

    /// Page load: runs both sections' initial fetches as independent tasks.
    ///
    /// Neither waits for the other. Returns the catalog's error, if any, once
    /// both have finished.
    pub async fn load(&mut self) -> ApiResult<()> {
        info!("Loading dashboard");

        let catalog = self.catalog.as_mut();
        let bestsellers = self.bestsellers.as_mut();

        let (catalog_result, ()) = tokio::join!(
            async move {
                match catalog {
                    Some(controller) => controller.refresh().await.map(|_| ()),
                    None => Ok(()),
                }
            },
            async move {
                if let Some(controller) = bestsellers {
                    controller.load().await;
                }
            }
        );

        if let Err(err) = &catalog_result {
            warn!("Catalog failed to load: {}", err);
        }
        catalog_result
    }
}
