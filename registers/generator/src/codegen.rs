/*++
Licensed under the Apache-2.0 license.
--*/

//! Renders a [`RegisterTable`] as a UVM register model in SystemVerilog.

use crate::config::GeneratorConfig;
use crate::schema::{FieldSpec, RegisterSpec, RegisterTable};

const RULE: &str = "//---------------------------------------";
const WIDE_RULE: &str = "//-------------------------------------------------------------------------";

/// Width passed to every `uvm_reg` constructor.
pub const REGISTER_WIDTH: u32 = 32;

/// Lines of `configure(...)` arguments line up under the opening parenthesis.
const CONFIGURE_INDENT: &str = "                           ";

/// Instance handle used for a register inside the block.
pub fn instance_name(register: &str) -> String {
    format!("reg_{}", register.to_lowercase())
}

pub fn render(table: &RegisterTable, config: &GeneratorConfig) -> String {
    let guard = &config.include_guard;
    let mut tokens = format!("`ifndef {guard}\n`define {guard}\n\n");
    for reg in table.registers.iter() {
        tokens += &render_register(reg);
    }
    tokens += &render_block(&table.unique_names(), config);
    tokens += &format!("`endif // {guard}\n");
    tokens
}

fn render_register(reg: &RegisterSpec) -> String {
    let name = &reg.name;
    let mut tokens = format!("class {name} extends uvm_reg;\n");
    tokens += &format!("  `uvm_object_utils({name})\n\n");
    tokens += &format!("  {RULE}\n");
    tokens += "  // Constructor\n";
    tokens += &format!("  {RULE}\n");
    tokens += &format!("  function new(string name = \"{name}\");\n");
    tokens += &format!("    super.new(name, {REGISTER_WIDTH}, UVM_NO_COVERAGE);\n");
    tokens += "  endfunction\n\n";

    tokens += &format!("  {RULE}\n");
    for field in reg.fields.iter() {
        tokens += &format!("    rand uvm_reg_field {};\n", field.name);
    }
    tokens += &format!("  {RULE}\n");
    tokens += "  function void build;\n";
    let reset = reg.reset_literal();
    for field in reg.fields.iter() {
        tokens += &render_field_build(field, &reg.access, &reset);
    }
    tokens += "  endfunction\n";
    tokens += "endclass\n\n";
    tokens
}

fn render_field_build(field: &FieldSpec, access: &str, reset: &str) -> String {
    let name = &field.name;
    let args = [
        format!("size({})", field.width()),
        format!("lsb_pos({})", field.lsb),
        format!("msb_pos({})", field.msb),
        format!("access(\"{access}\")"),
        "volatile(0)".to_string(),
        format!("reset({reset})"),
        "has_reset(1)".to_string(),
        "is_rand(1)".to_string(),
        "individually_accessible(0)".to_string(),
    ];
    let mut tokens = format!("    {name} = uvm_reg_field::type_id::create(\"{name}\");\n");
    tokens += &format!("    {name}.configure(.parent(this),\n");
    let last = args.len() - 1;
    for (i, arg) in args.iter().enumerate() {
        let end = if i == last { ");" } else { "," };
        tokens += &format!("{CONFIGURE_INDENT}.{arg}{end}\n");
    }
    tokens
}

/// Every register is mapped at offset 0 with access "RW", whatever the
/// table says; see `diagnostics::MapEntryIgnored`.
fn render_block(names: &[&str], config: &GeneratorConfig) -> String {
    let block = &config.block_name;
    let mut tokens = format!("{WIDE_RULE}\n");
    tokens += "//\tRegister Block Definition\n";
    tokens += &format!("{WIDE_RULE}\n");
    tokens += &format!("class {block} extends uvm_reg_block;\n");
    tokens += &format!("  `uvm_object_utils({block})\n\n");
    tokens += &format!("  {RULE}\n");
    tokens += "  // Register Instances\n";
    tokens += &format!("  {RULE}\n");
    for name in names {
        tokens += &format!("  rand {name} {};\n", instance_name(name));
    }

    tokens += &format!("\n  {RULE}\n");
    tokens += "  // Constructor\n";
    tokens += &format!("  {RULE}\n");
    tokens += "  function new (string name = \"\");\n";
    tokens += "    super.new(name, build_coverage(UVM_NO_COVERAGE));\n";
    tokens += "  endfunction\n\n";
    tokens += &format!("  {RULE}\n");
    tokens += "  // Build Phase\n";
    tokens += &format!("  {RULE}\n");
    tokens += "  function void build();\n";
    for name in names {
        let inst = instance_name(name);
        tokens += &format!("    {inst} = {name}::type_id::create(\"{inst}\");\n");
        tokens += &format!("    {inst}.build();\n");
        tokens += &format!("    {inst}.configure(this);\n");
    }

    tokens += &format!("    {RULE}\n");
    tokens += "    // Memory Map Creation and Register Map\n";
    tokens += &format!("    {RULE}\n");
    tokens += &format!(
        "    default_map = create_map(\"{}\", 0, 4, UVM_LITTLE_ENDIAN);\n",
        config.map_name
    );
    for name in names {
        tokens += &format!("    default_map.add_reg({}, 'h0, \"RW\");\n", instance_name(name));
    }
    tokens += "    lock_model();\n";
    tokens += "  endfunction\n";
    tokens += "endclass\n\n";
    tokens
}
