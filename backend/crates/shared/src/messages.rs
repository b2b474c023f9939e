//! Stable Response Message Identifiers
//!
//! Every API response carries one of these identifiers in its `message`
//! field. Clients match on the identifier, never on free-form text, so
//! these strings are part of the wire contract and must not change.

/// Malformed or missing input, including an absent bearer token
pub const INVALID_PARAMETERS: &str = "invalidParameters";

/// Login or re-authentication failure
pub const INVALID_CREDENTIALS: &str = "invalidCredentials";

/// Uniqueness violation (duplicate email, duplicate favourite)
pub const ALREADY_EXISTS: &str = "alreadyExists";

/// Missing resource
pub const NOT_FOUND: &str = "notFound";

/// Upload with a content type outside the image allow-list
pub const UNSUPPORTED_FILE_TYPE: &str = "unsupportedFileType";

/// Present but bad/expired bearer token (distinct from missing)
pub const INVALID_AUTHORIZATION_TOKEN: &str = "invalidAuthorizationToken";

/// Unexpected store/hash/email failure
pub const INTERNAL_SERVER_ERROR: &str = "internalServerError";

/// Resource created
pub const CREATED_SUCCESSFULLY: &str = "createdSuccessfully";

/// Resource updated
pub const UPDATED_SUCCESSFULLY: &str = "updatedSuccessfully";

/// Favourite added
pub const ADDED_SUCCESSFULLY: &str = "addedSuccessfully";

/// Favourite removed
pub const REMOVED_SUCCESSFULLY: &str = "removedSuccessfully";

/// Membership check: the book is a favourite
pub const IS_FAVOURITE: &str = "isFavourite";

/// Membership check: the book is not a favourite
pub const IS_NOT_FAVOURITE: &str = "isNotFavourite";
