pub mod image_processor;
pub mod resize_service;
pub mod storage;
