//! Domain model, ports, and business services.

pub mod book;
pub mod catalog_service;
pub mod credentials;
pub mod dashboard;
pub mod ports;
pub mod principal;
pub mod session;
pub mod user;
pub mod user_service;

pub use book::{
    Book, BookDetails, BookId, BookListing, BookSubmission, BookValidationError, NewBook, Price,
    PublicBookId,
};
pub use catalog_service::CatalogService;
pub use credentials::{Credentials, CredentialsValidationError};
pub use dashboard::{Dashboard, DASHBOARD_BOOK_LIMIT};
pub use principal::{Authority, Principal, PrincipalError};
pub use session::SessionService;
pub use user::{User, UserDraft, UserId, UserName, UserValidationError};
pub use user_service::UserService;
