pub mod alert;
pub mod session;

pub use alert::{
    Alert, Application, DashboardModel, EmailConfig, SelectedFilter, SubscriberGroupConfig,
    APPLICATIONS_FILTER,
};
pub use session::{Credentials, SessionInfo};
