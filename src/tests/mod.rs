mod cli_context_tests;
mod commands_tests;
mod error_tests;
