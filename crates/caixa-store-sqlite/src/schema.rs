//! SQL schema for the Caixa SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout; there are no migrations yet.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT guarantees ids are never handed out twice, even after the
-- highest row has been deleted.
CREATE TABLE IF NOT EXISTS vendas (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    tipo           TEXT    NOT NULL,
    item           TEXT    NOT NULL,
    quantidade     INTEGER NOT NULL CHECK (quantidade > 0),
    valor_unitario TEXT    NOT NULL,   -- decimal string, 2 fractional digits
    valor_total    TEXT    NOT NULL,   -- decimal string, 2 fractional digits
    data           TEXT    NOT NULL,   -- YYYY-MM-DD business date
    data_hora      TEXT    NOT NULL    -- RFC 3339 UTC, fixed width; server-assigned
);

CREATE TABLE IF NOT EXISTS despesas (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    descricao TEXT NOT NULL,
    categoria TEXT NOT NULL,
    valor     TEXT NOT NULL,
    data      TEXT NOT NULL,
    data_hora TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS vendas_data_idx      ON vendas(data);
CREATE INDEX IF NOT EXISTS vendas_data_hora_idx ON vendas(data_hora);
CREATE INDEX IF NOT EXISTS despesas_data_idx    ON despesas(data);
CREATE INDEX IF NOT EXISTS despesas_data_hora_idx ON despesas(data_hora);

PRAGMA user_version = 1;
";
