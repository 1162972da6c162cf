//! Backend error codes and their Polish messages.
//!
//! The backend reports failures as `{ errorCode, errorDescription, error }`,
//! where `errorDescription` is the English name of the code ("Repair not
//! found"). The description, upper-cased with spaces turned into
//! underscores, is the key into this table.

/// Known backend error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // 10xx - security
    BadCredentials,
    AccountLocked,
    // 11xx - repairs
    RepairNotFound,
    // 12xx - vehicles
    VehicleNotFound,
    // 13xx - clients
    ClientNotFound,
    // 14xx - parts
    PartNotFound,
    RepairPartNotFound,
    // 15xx - files
    FileNotUploaded,
    FileNotFound,
    FileAlreadyExists,
    NoFileAccess,
    NoCode,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::BadCredentials,
        ErrorCode::AccountLocked,
        ErrorCode::RepairNotFound,
        ErrorCode::VehicleNotFound,
        ErrorCode::ClientNotFound,
        ErrorCode::PartNotFound,
        ErrorCode::RepairPartNotFound,
        ErrorCode::FileNotUploaded,
        ErrorCode::FileNotFound,
        ErrorCode::FileAlreadyExists,
        ErrorCode::NoFileAccess,
        ErrorCode::NoCode,
    ];

    pub fn code(self) -> u16 {
        match self {
            ErrorCode::BadCredentials => 1000,
            ErrorCode::AccountLocked => 1001,
            ErrorCode::RepairNotFound => 1100,
            ErrorCode::VehicleNotFound => 1200,
            ErrorCode::ClientNotFound => 1300,
            ErrorCode::PartNotFound => 1400,
            ErrorCode::RepairPartNotFound => 1401,
            ErrorCode::FileNotUploaded => 1500,
            ErrorCode::FileNotFound => 1501,
            ErrorCode::FileAlreadyExists => 1502,
            ErrorCode::NoFileAccess => 1503,
            ErrorCode::NoCode => 0,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ErrorCode::BadCredentials => "BAD_CREDENTIALS",
            ErrorCode::AccountLocked => "ACCOUNT_LOCKED",
            ErrorCode::RepairNotFound => "REPAIR_NOT_FOUND",
            ErrorCode::VehicleNotFound => "VEHICLE_NOT_FOUND",
            ErrorCode::ClientNotFound => "CLIENT_NOT_FOUND",
            ErrorCode::PartNotFound => "PART_NOT_FOUND",
            ErrorCode::RepairPartNotFound => "REPAIR_PART_NOT_FOUND",
            ErrorCode::FileNotUploaded => "FILE_NOT_UPLOADED",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::FileAlreadyExists => "FILE_ALREADY_EXISTS",
            ErrorCode::NoFileAccess => "NO_FILE_ACCESS",
            ErrorCode::NoCode => "NO_CODE",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::BadCredentials => "Zły login lub hasło.",
            ErrorCode::AccountLocked => "Konto zablokowane.",
            ErrorCode::RepairNotFound => "Naprawa nie została znaleziona.",
            ErrorCode::VehicleNotFound => "Pojazd nie został znaleziony.",
            ErrorCode::ClientNotFound => "Klient nie został znaleziony.",
            ErrorCode::PartNotFound => "Część nie została znaleziona.",
            ErrorCode::RepairPartNotFound => "Część do naprawy nie została znaleziona.",
            ErrorCode::FileNotUploaded => "Plik nie został przesłany.",
            ErrorCode::FileNotFound => "Plik nie został znaleziony.",
            ErrorCode::FileAlreadyExists => "Plik już istnieje.",
            ErrorCode::NoFileAccess => "Brak dostępu do pliku.",
            ErrorCode::NoCode => "Brak kodu.",
        }
    }

    /// Look up a code by the backend's `errorDescription`.
    pub fn from_description(description: &str) -> Option<Self> {
        let key = description.trim().to_uppercase().replace(' ', "_");
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_description() {
        assert_eq!(
            ErrorCode::from_description("Repair not found"),
            Some(ErrorCode::RepairNotFound)
        );
        assert_eq!(
            ErrorCode::from_description("Bad credentials"),
            Some(ErrorCode::BadCredentials)
        );
        assert_eq!(ErrorCode::from_description("Internal server error"), None);
    }

    #[test]
    fn test_codes_are_unique() {
        for a in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(a.code()), Some(a));
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::ClientNotFound.message(), "Klient nie został znaleziony.");
        assert_eq!(ErrorCode::NoCode.code(), 0);
    }
}
