pub mod booking_dto;
pub mod contact_dto;
pub mod project_dto;
pub mod response;
