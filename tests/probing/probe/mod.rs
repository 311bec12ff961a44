/*!
Probe tests module.

Tests for target validation, outcome classification, the prober with mock
clients, and end-to-end probes against local fixture servers.
*/
