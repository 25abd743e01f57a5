use std::future::Future;

use tracing::{debug, info};

use crate::client::RemoteStateClient;
use crate::config::PanelConfig;
use crate::controller::{MutationController, Phase};
use crate::widgets::ControlPanel;

/// Bring up a panel.
///
/// The initial fetch starts immediately and runs concurrently with
/// `page_ready`; widgets are built once the page is ready, and the first
/// render happens when both have completed. A failed initial fetch leaves the
/// returned controller in [`Phase::Errored`] with the flash banner shown.
pub async fn bootstrap<C, P>(client: C, config: PanelConfig, page_ready: P) -> MutationController<C>
where
    C: RemoteStateClient,
    P: Future<Output = ()>,
{
    let (fetched, widgets) = tokio::join!(client.get_display_data(), async {
        page_ready.await;
        debug!("Page ready, building widgets");
        ControlPanel::new(&config)
    });

    let mut controller = MutationController::new(client, config.capabilities, widgets);
    controller.initialize(fetched);
    if controller.phase() == Phase::Idle {
        info!("Panel ready");
    }
    controller
}
