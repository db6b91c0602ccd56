pub mod application;
pub mod connector;
pub mod domain;

pub use application::{CheckConnectionUseCase, CheckResult};

pub use connector::{BASE_URL_ENV, ChatBackend, DEFAULT_BASE_URL, HttpChatBackend};

pub use domain::{
    display_stars, ChatReply, ChatRequest, ChatResponse, ClientError, FlightResult, HotelResult,
    Message, Mode, OpeningHours, PlaceResult, Role, SearchResults,
};

