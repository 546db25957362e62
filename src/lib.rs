//! Benchmark harness package for the ncalg workspace.
