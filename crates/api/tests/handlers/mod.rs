mod auth_test;
mod middleware_test;
mod reservations_test;
mod routes_test;
mod state_test;
