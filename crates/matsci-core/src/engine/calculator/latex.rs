/// Converts calculator input into the LaTeX preview shown above the display.
pub fn to_latex(input: &str) -> String {
    input
        .replace('*', "\\cdot ")
        .replace('/', "\\div ")
        .replace("sqrt", "\\sqrt")
        .replace("pi", "\\pi ")
        .replace("sin", "\\sin")
        .replace("cos", "\\cos")
        .replace("tan", "\\tan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_become_latex_commands() {
        assert_eq!(to_latex("2 * 3 / 4"), "2 \\cdot  3 \\div  4");
    }

    #[test]
    fn functions_and_pi_are_escaped() {
        assert_eq!(to_latex("sqrt(pi)"), "\\sqrt(\\pi )");
        assert_eq!(to_latex("sin(90) = 1"), "\\sin(90) = 1");
        assert_eq!(to_latex("cos + tan"), "\\cos + \\tan");
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(to_latex("12.5"), "12.5");
        assert_eq!(to_latex(""), "");
    }
}
