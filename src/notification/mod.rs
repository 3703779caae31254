pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_models;
pub mod notification_repository;
pub mod notification_service;

pub use notification_models::{Notification, NotificationKind, NotificationResponse};
pub use notification_repository::NotificationRepository;
pub use notification_service::start_reminder_service;
