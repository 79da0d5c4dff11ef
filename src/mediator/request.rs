// Closed set of request variants routed by the mediator.
//
// Every variant is listed once in `request_variants!`; the macro derives the
// tag enum, the `Request` sum type and the typed `MediatorRequest` impls from
// that list so the three cannot drift apart.

use std::fmt;

use serde::Serialize;

use crate::auth::UserId;
use crate::requests::{GetTodosQuery, PostTodoCommand, RegisterUserCommand};
use crate::store::{Todo, User};

/// Result of a dispatch, one variant per response type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Todos(Vec<Todo>),
    Todo(Todo),
    User(User),
}

impl Response {
    pub fn type_name(&self) -> &'static str {
        match self {
            Response::Todos(_) => "Vec<Todo>",
            Response::Todo(_) => "Todo",
            Response::User(_) => "User",
        }
    }
}

/// Ties a typed request struct to its variant tag and response type
pub trait MediatorRequest: Sized + Send + Sync + 'static {
    type Response: Send + 'static;

    const KIND: RequestKind;

    fn into_request(self) -> Request;

    fn from_request(request: Request) -> Option<Self>;

    fn from_request_ref(request: &Request) -> Option<&Self>;

    fn into_response(response: Self::Response) -> Response;

    fn from_response(response: Response) -> Option<Self::Response>;
}

macro_rules! request_variants {
    ($( $variant:ident($ty:ident) -> $resp_variant:ident($resp:ty) ),+ $(,)?) => {
        /// Variant tag used as the registry key
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum RequestKind {
            $($variant),+
        }

        impl RequestKind {
            pub const ALL: &'static [RequestKind] = &[$(RequestKind::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(RequestKind::$variant => stringify!($ty)),+
                }
            }
        }

        #[derive(Debug, Clone)]
        pub enum Request {
            $($variant($ty)),+
        }

        impl Request {
            pub fn kind(&self) -> RequestKind {
                match self {
                    $(Request::$variant(_) => RequestKind::$variant),+
                }
            }

            pub fn set_user_id(&mut self, user_id: UserId) {
                match self {
                    $(Request::$variant(r) => r.user_id = user_id),+
                }
            }
        }

        $(
            impl MediatorRequest for $ty {
                type Response = $resp;

                const KIND: RequestKind = RequestKind::$variant;

                fn into_request(self) -> Request {
                    Request::$variant(self)
                }

                #[allow(unreachable_patterns)]
                fn from_request(request: Request) -> Option<Self> {
                    match request {
                        Request::$variant(r) => Some(r),
                        _ => None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn from_request_ref(request: &Request) -> Option<&Self> {
                    match request {
                        Request::$variant(r) => Some(r),
                        _ => None,
                    }
                }

                fn into_response(response: $resp) -> Response {
                    Response::$resp_variant(response)
                }

                #[allow(unreachable_patterns)]
                fn from_response(response: Response) -> Option<$resp> {
                    match response {
                        Response::$resp_variant(r) => Some(r),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Request {
                fn from(request: $ty) -> Self {
                    Request::$variant(request)
                }
            }
        )+
    };
}

request_variants! {
    GetTodos(GetTodosQuery) -> Todos(Vec<Todo>),
    PostTodo(PostTodoCommand) -> Todo(Todo),
    RegisterUser(RegisterUserCommand) -> User(User),
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
