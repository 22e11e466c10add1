// End-to-end tests for the IncDrops backend API
//
// Each test starts its own server on an ephemeral port, backed by an
// in-memory key-value store, a scripted idea oracle and a fixed clock.
// Restarting a server over the same store exercises persistence.
//
// The Postgres store tests share one testcontainers PostgreSQL instance and
// give every test its own freshly created database.

mod helpers;
mod test_gemini;
mod test_health;
