pub mod available_requests_table;
pub mod donor_details_popup;
pub mod layout;
pub mod my_requests_table;
pub mod request_actions_menu;
pub mod spinner;
pub mod toast;

pub use available_requests_table::AvailableRequestsTable;
pub use donor_details_popup::DonorDetailsPopup;
pub use layout::Header;
pub use my_requests_table::MyRequestsTable;
pub use request_actions_menu::RequestActionsMenu;
pub use spinner::Spinner;
pub use toast::ToastContainer;
