mod fixture;
mod report_tests;
mod skill_tests;
mod workflow_tests;
