use crate::license_store::LicenseCodeSet;

/// Exact, case-sensitive membership test against the loaded codes.
#[derive(Debug, Clone)]
pub struct CodeValidator {
    codes: LicenseCodeSet,
}

impl CodeValidator {
    pub fn new(codes: LicenseCodeSet) -> Self {
        Self { codes }
    }

    pub fn validate(&self, candidate: &str) -> bool {
        self.codes.all().iter().any(|code| code.as_str() == candidate)
    }
}
