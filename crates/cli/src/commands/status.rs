//! Order status command.

use tracing::info;

use pazar_core::OrderStatus;
use pazar_engine::orders::get_next_status;

/// Log what can happen to an order in `status`.
pub fn describe(status: OrderStatus) {
    info!("{status} ({})", status.label());

    match get_next_status(status) {
        Some(next) => info!("  Next: {next} ({})", next.label()),
        None => info!("  Next: none"),
    }

    let allowed: Vec<&str> = status
        .allowed_transitions()
        .iter()
        .map(|s| s.as_str())
        .collect();
    info!("  Allowed: [{}]", allowed.join(", "));
    info!("  Cancellable: {}", status.can_cancel());
    info!("  Terminal: {}", status.is_terminal());
}
