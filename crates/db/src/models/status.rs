//! Status helper enums mapping to SMALLSERIAL lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding lookup table.

use dogland_core::types::LookupId;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = LookupId;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Map a database ID back to a variant.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Species catalog.
    Species {
        Dog = 1,
        Cat = 2,
        Other = 3,
    }
}

define_status_enum! {
    /// Health status shared by animals and sightings.
    HealthStatus {
        Healthy = 1,
        Injured = 2,
        Sick = 3,
        Critical = 4,
        Unknown = 5,
    }
}

define_status_enum! {
    /// Sighting follow-up status.
    SightingStatus {
        Reported = 1,
        Verified = 2,
        Rescued = 3,
        Closed = 4,
    }
}

define_status_enum! {
    /// Adoption request review status.
    RequestStatus {
        Pending = 1,
        UnderReview = 2,
        Approved = 3,
        Rejected = 4,
        Cancelled = 5,
    }
}

impl RequestStatus {
    /// Final statuses freeze the request (mirrors `request_statuses.is_final`).
    pub fn is_final(self) -> bool {
        matches!(
            self,
            RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled
        )
    }
}

define_status_enum! {
    /// User role.
    Role {
        Admin = 1,
        Staff = 2,
        Member = 3,
    }
}
