mod helpers;

mod form_test;
mod report_test;
mod user_test;
