pub mod profile_fixture;
