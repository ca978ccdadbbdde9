use crate::blockchain::Student;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddStudentRequest {
    pub name: String,
    /// Enrollment number, decimal or `0x`-prefixed hex
    pub enrollment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    /// 1-based position used to address the row for deletion
    pub position: u64,
    pub name: String,
    pub enrollment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub total_count: u64,
    /// False until the roster has been read, and after any refresh that could not read the contract
    pub refreshed: bool,
}

impl StudentListResponse {
    pub fn from_roster(students: &[Student], refreshed: bool) -> Self {
        let students: Vec<StudentResponse> = students
            .iter()
            .zip(1u64..)
            .map(|(student, position)| StudentResponse {
                position,
                name: student.name.clone(),
                enrollment: student.enrollment.to_string(),
            })
            .collect();

        Self {
            total_count: students.len() as u64,
            students,
            refreshed,
        }
    }
}
