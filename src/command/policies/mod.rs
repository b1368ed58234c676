pub mod flag_policy;
