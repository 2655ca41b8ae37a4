//! Common source fixtures for tests.

/// Wrap field declarations in a table.
pub fn table_with_fields(fields: &str) -> String {
    format!("table 50100 \"My Table\"\n{{\n    fields\n    {{\n{fields}    }}\n}}\n")
}

/// Wrap field declarations in a table with an object-level `ObsoleteState`.
pub fn obsolete_table_with_fields(state: &str, fields: &str) -> String {
    format!(
        "table 50100 \"My Table\"\n{{\n    ObsoleteState = {state};\n\n    fields\n    {{\n{fields}    }}\n}}\n"
    )
}

/// An editable FlowField with the given extra property lines.
pub fn flowfield(id: u32, name: &str, extra: &str) -> String {
    format!(
        "        field({id}; {name}; Boolean)\n        {{\n            FieldClass = FlowField;\n{extra}        }}\n"
    )
}

pub const EDITABLE_TRUE: &str = "            Editable = true;\n";

pub const MY_CALC_FIELD: &str = r#"table 50100 "My Table"
{
    fields
    {
        field(1; "No."; Code[20]) { }
        field(2; MyCalcField; Boolean)
        {
            FieldClass = FlowField;
            Editable = true;
        }
    }
}
"#;

pub const MY_CALC_FIELD_MOVED: &str = r#"table 50100 "My Table"
{
    fields
    {
        field(2; MyCalcField; Boolean)
        {
            FieldClass = FlowField;
            Editable = true;
            ObsoleteState = Moved;
        }
    }
}
"#;

pub const MY_CALC_FIELD_FIXED: &str = r#"table 50100 "My Table"
{
    fields
    {
        field(1; "No."; Code[20]) { }
        field(2; MyCalcField; Boolean)
        {
            FieldClass = FlowField;
            Editable = false;
        }
    }
}
"#;

pub const MIXED_FIELDS: &str = r#"table 50100 Totals
{
    fields
    {
        field(1; Amount; Decimal)
        {
            FieldClass = FlowField;
            CalcFormula = sum("Ledger Entry".Amount);
        }
        field(2; Plain; Decimal)
        {
            Editable = true;
        }
        field(3; Quantity; Decimal)
        {
            FieldClass = FlowField;
            Editable = true;
        }
        field(4; Filter; Date)
        {
            FieldClass = FlowFilter;
        }
        field(5; Compliant; Decimal)
        {
            FieldClass = FlowField;
            Editable = false;
        }
    }
}
"#;
