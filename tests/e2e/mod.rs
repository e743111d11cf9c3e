// End-to-end tests for the ReadAloud Backend API
//
// Each test starts the full router on an ephemeral port with an in-process fake
// TTS provider, so no cloud credentials or network access are needed.
//
// Architecture:
// - test-context creates one server per test (setup) and drops it afterwards
// - FakeTts records every chunk it is asked to synthesize
// - TestClient talks to the server over real HTTP with hyper

mod helpers;
mod test_convert;
mod test_health;
