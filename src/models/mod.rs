pub mod api;
pub mod auth;
pub mod classroom;
pub mod student;

pub use api::{ApiEnvelope, ErrorBody};
pub use auth::{
    AuthData, ConfirmEmailRequest, EmailRequest, LoginRequest, ResetPasswordRequest,
    TeacherSignupRequest,
};
pub use classroom::{
    ClassCodeRequest, ClassDetail, ClassSummary, CreateClassRequest, CreatedClass,
    UpdateClassRequest,
};
pub use student::{
    CreateStudentsReply, CreatedStudent, CreatedStudents, DraftStudentRow, StudentBatchRequest,
    StudentCreationResult, StudentRecord,
};
