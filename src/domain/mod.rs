pub mod amenity;
pub mod inquiry;
pub mod room;
pub mod user;

pub use amenity::{group_by_category, Amenity, AmenityGroup};
pub use inquiry::{BookingInquiry, BookingStatus, ContactInquiry, ContactStatus, NewBooking, NewContact};
pub use room::{format_cents, Room, RoomDraft};
pub use user::{NewUser, Role, User};
