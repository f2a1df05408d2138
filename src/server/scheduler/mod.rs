pub mod ticket_sweep;
