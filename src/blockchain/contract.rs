use ethers::prelude::*;

// ABI for StudentRoster contract
abigen!(
    StudentRoster,
    r#"[
        function owner() external view returns (address)
        function admins(address) external view returns (bool)
        function addAdmin(address _admin) external
        function deleteAdmin(address _admin) external
        function addStudent(string _name, uint256 _enrollmentNumber) external
        function deleteStudent(uint256 _index) external
        function studentCount() external view returns (uint256)
        function students(uint256) external view returns (string name, uint256 enrollment)
    ]"#
);
