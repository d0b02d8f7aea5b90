pub mod gateway;
pub mod overview;
pub mod payments;
pub mod stations;

pub use gateway::{NetworkGateway, PaymentConfirmation, SlotWrite};
pub use overview::{PortOverview, SlotEdit, StationOverviewService};
pub use payments::{PaymentReturnService, VnpayReturn};
pub use stations::StationDirectory;
