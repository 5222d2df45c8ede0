mod concurrency_test;
mod enrollment_test;
mod helpers;
mod scenario_test;
