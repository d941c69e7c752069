pub mod auth_viewmodel;
pub mod class_view_viewmodel;
pub mod dashboard_viewmodel;
pub mod forms;
pub mod roster_viewmodel;
pub mod student_import_viewmodel;
pub mod student_staging;

pub use auth_viewmodel::AuthViewModel;
pub use class_view_viewmodel::{ClassViewModel, TransferDraft};
pub use dashboard_viewmodel::DashboardViewModel;
pub use forms::{FormHandle, FormModel, FormState, FormView};
pub use roster_viewmodel::{RosterViewModel, SortDirection};
pub use student_import_viewmodel::StudentImportViewModel;
pub use student_staging::{ImportError, StudentStaging};
