//! Built-in topic table.
//!
//! Nine canned programming concepts with their detection patterns, example
//! code, and explanations. Table order is load-bearing: the response engine
//! returns the first topic whose patterns match, so earlier entries win ties.
//!
//! Patterns are authored for lowercase input (queries are lowercased before
//! matching). Snippets use fenced-code markers for the presentation layer.

use codetutor_shared::TopicDef;

fn topic(id: &str, patterns: &[&str], snippet: &str, explanation: &str) -> TopicDef {
    TopicDef {
        id: id.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        snippet: snippet.trim_start_matches('\n').to_string(),
        explanation: explanation.to_string(),
    }
}

/// The built-in topic table, in definition order.
pub fn builtin_topics() -> Vec<TopicDef> {
    vec![
        topic(
            "oop_classes",
            &[
                r"class.*rectangle",
                r"rectangle.*class",
                r"oop.*class",
                r"python.*class",
                r"object.*oriented",
                r"create.*class",
                r"method.*class",
                r"property.*class",
                r"bank.*account",
                r"account.*class",
                r"simple.*class",
            ],
            r#"
```python
class BankAccount:
    """Simple BankAccount class with deposit/withdraw functionality"""

    def __init__(self, account_holder: str, balance: float = 0.0):
        self.account_holder = account_holder
        self.balance = balance
        self.transaction_history = []

    def deposit(self, amount: float) -> None:
        if amount <= 0:
            raise ValueError("Deposit amount must be positive")
        self.balance += amount
        self.transaction_history.append(f"Deposit: +${amount:.2f}")

    def withdraw(self, amount: float) -> None:
        if amount <= 0:
            raise ValueError("Withdrawal amount must be positive")
        if amount > self.balance:
            raise ValueError("Insufficient funds")
        self.balance -= amount
        self.transaction_history.append(f"Withdrawal: -${amount:.2f}")

    def get_balance(self) -> float:
        return self.balance
```"#,
            "Complete BankAccount class demonstrating object-oriented programming \
             principles. Includes deposit/withdraw methods with validation and \
             transaction history tracking.",
        ),
        topic(
            "fibonacci",
            &[
                r"fibonacci",
                r"recursive.*function",
                r"recursion",
                r"sequence.*number",
                r"calculate.*fib",
                r"fib.*number",
                r"recursive.*algorithm",
            ],
            r#"
```python
def fibonacci(n: int) -> int:
    """Calculate Fibonacci number recursively"""
    if n <= 1:
        return n
    return fibonacci(n - 1) + fibonacci(n - 2)

def fibonacci_iterative(n: int) -> int:
    """Fibonacci using iterative approach (most efficient)"""
    if n <= 1:
        return n
    a, b = 0, 1
    for _ in range(2, n + 1):
        a, b = b, a + b
    return b
```"#,
            "Fibonacci implementation with two approaches: basic recursive \
             (educational) and iterative (most efficient). The recursive form \
             mirrors the mathematical definition; the iterative form runs in \
             linear time.",
        ),
        topic(
            "file_operations",
            &[
                r"read.*file",
                r"count.*lines",
                r"text.*file",
                r"file.*operation",
                r"open.*file",
                r"process.*file",
                r"line.*count",
                r"file.*read",
            ],
            r#"
```python
def count_lines(filename: str) -> int:
    """Count lines in a text file"""
    try:
        with open(filename, "r", encoding="utf-8") as f:
            return sum(1 for _ in f)
    except FileNotFoundError:
        print(f"File not found: {filename}")
        return 0

def read_file(filename: str) -> str:
    """Read entire file contents"""
    with open(filename, "r", encoding="utf-8") as f:
        return f.read()
```"#,
            "File operations including line counting and reading files. Uses \
             context managers so handles are closed automatically, UTF-8 \
             encoding, and explicit handling for missing files.",
        ),
        topic(
            "math_operations",
            &[
                r"max.*number",
                r"maximum.*number",
                r"find.*max",
                r"largest.*number",
                r"min.*number",
                r"minimum.*number",
                r"find.*min",
                r"smallest.*number",
                r"average.*number",
                r"mean.*number",
                r"math.*function",
                r"calculate.*number",
                r"python.*function.*maximum",
                r"function.*find.*max",
            ],
            r#"
```python
def find_max(numbers: list) -> float:
    """Find the maximum of a list of numbers"""
    if not numbers:
        raise ValueError("No numbers provided")
    return max(numbers)

def find_min(numbers: list) -> float:
    if not numbers:
        raise ValueError("No numbers provided")
    return min(numbers)

def average(numbers: list) -> float:
    if not numbers:
        raise ValueError("No numbers provided")
    return sum(numbers) / len(numbers)
```"#,
            "Mathematical helpers for maximum, minimum, and average over any \
             number of values, with explicit errors for empty input.",
        ),
        topic(
            "email_validation",
            &[
                r"validate.*email",
                r"email.*regex",
                r"check.*email",
                r"regex.*email",
                r"email.*validation",
                r"python.*email",
                r"verify.*email",
            ],
            r#"
```python
import re

EMAIL_RE = re.compile(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")

def is_valid_email(email: str) -> bool:
    """Validate an email address with a regex"""
    if len(email) > 254:
        return False
    return EMAIL_RE.match(email) is not None
```"#,
            "Email validation using a compiled regular expression plus a length \
             check. The pattern covers the common local-part@domain.tld shape; \
             full RFC 5322 validation needs a dedicated parser.",
        ),
        topic(
            "web_scraping",
            &[
                r"scrape.*web",
                r"web.*scrap",
                r"beautifulsoup",
                r"requests.*html",
                r"extract.*title",
                r"get.*webpage",
                r"parse.*html",
                r"scrap.*content",
                r"title.*webpage",
                r"web.*content",
            ],
            r#"
```python
import requests
from bs4 import BeautifulSoup

def get_page_title(url: str) -> str:
    """Fetch a webpage and extract its title"""
    response = requests.get(url, timeout=10,
                            headers={"User-Agent": "Mozilla/5.0"})
    response.raise_for_status()
    soup = BeautifulSoup(response.text, "html.parser")
    return soup.title.string.strip() if soup.title else ""
```"#,
            "Web scraping with requests and BeautifulSoup to extract the page \
             title. Sets a user agent, a timeout, and raises on HTTP errors \
             before parsing.",
        ),
        topic(
            "prime_numbers",
            &[
                r"prime.*number",
                r"check.*prime",
                r"is.*prime",
                r"prime.*function",
                r"test.*prime",
                r"prime.*algorithm",
                r"number.*prime",
            ],
            r#"
```python
def is_prime(n: int) -> bool:
    """Check whether n is prime (trial division up to sqrt(n))"""
    if n < 2:
        return False
    if n < 4:
        return True
    if n % 2 == 0:
        return False
    i = 3
    while i * i <= n:
        if n % i == 0:
            return False
        i += 2
    return True
```"#,
            "Primality testing by trial division up to the square root, skipping \
             even candidates. Handles the small-number edge cases explicitly.",
        ),
        topic(
            "dictionary_operations",
            &[
                r"merge.*dict",
                r"dict.*merge",
                r"combine.*dict",
                r"update.*dict",
                r"dictionary.*operation",
                r"python.*dict",
                r"join.*dict",
            ],
            r#"
```python
def merge_dicts(a: dict, b: dict) -> dict:
    """Merge two dictionaries; values in b win on conflict"""
    return {**a, **b}

# Python 3.9+ union operator
merged = {"x": 1} | {"y": 2}
```"#,
            "Dictionary merging with unpacking and the union operator. On key \
             conflicts the right-hand dictionary's value wins.",
        ),
        topic(
            "file_writing",
            &[
                r"write.*file",
                r"list.*file",
                r"save.*file",
                r"output.*file",
                r"write.*list",
                r"strings.*file",
                r"file.*write",
            ],
            r#"
```python
def write_lines(filename: str, lines: list[str]) -> None:
    """Write a list of strings to a file, one per line"""
    with open(filename, "w", encoding="utf-8") as f:
        f.write("\n".join(lines))
        f.write("\n")
```"#,
            "Writing a list of strings to a file, newline-separated. The context \
             manager flushes and closes the handle; UTF-8 is explicit.",
        ),
    ]
}
