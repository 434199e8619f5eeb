//! Graph fixtures shared by interpreter tests.
