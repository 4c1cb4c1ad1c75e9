use super::gas_cost;
use crate::interpreter::Interpreter;

pub(crate) fn add(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "ADD");
    pop!(interp, b, a);
    push!(interp, a.add(b));
    interp.state.pc += 1;
}

pub(crate) fn sub(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "SUB");
    pop!(interp, b, a);
    push!(interp, a.sub(b));
    interp.state.pc += 1;
}

pub(crate) fn mul(interp: &mut Interpreter) {
    gas!(interp, gas_cost::LOW, "MUL");
    pop!(interp, b, a);
    push!(interp, a.mul(b));
    interp.state.pc += 1;
}

pub(crate) fn div(interp: &mut Interpreter) {
    gas!(interp, gas_cost::LOW, "DIV");
    pop!(interp, b, a);
    push!(interp, a.div(b));
    interp.state.pc += 1;
}
