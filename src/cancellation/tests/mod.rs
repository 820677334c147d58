//! Unit tests for the canceled-request list.
