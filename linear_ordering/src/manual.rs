/*!

This is the long-form manual for `linear_ordering` and `linord`.

## The method

The standardized sum method orders objects described by several variables from the best
to the worst. It requires all the variables to be stimulants: for every variable, a higher
value must be better. Destimulants (lower is better) must be converted before running the
program, for example by negating them or taking their inverse. The program does not do it.

The steps are:
- descriptive statistics of each variable: minimum, maximum, mean, median, population
  standard deviation, variance and coefficient of variation (in %)
- standardization: each value is replaced by `(value - mean) / standard deviation` of its
  variable
- each observation gets the mean of its standardized values
- these means are normalized with `(mean - min) / (max - min)`, giving an index in [0, 1]
- observations are ranked by decreasing index. Observations with the same index keep the
  order of the observation file.

The coefficient of variation is a quality check. Variables with a coefficient lower than
the minimum requested are reported with a note recommending their removal. They are still
used for the ranking.

The following situations stop the program, since one of the divisions is undefined:
- a variable with a mean of exactly 0 (coefficient of variation)
- a variable with the same value for every observation (standardization)
- all the observations getting the same mean (normalization)

## Input files

Three text files are needed. They must all be different files.

### Observations

One name per line, in the order used by the data file.

```text
Warsaw
Cracow
Gdansk
```

### Variables

One name per line, in the order used by the data file.

### Data

Numbers separated by spaces or new lines. The number of values must be exactly the
number of observations times the number of variables. Two layouts are accepted:
- `observation-major` (default): the values of the first observation (one per variable),
  then the values of the second observation, and so on. With one observation per line, the
  file looks like a table.
- `variable-major`: the values of the first variable (one per observation), then the
  second variable, and so on. Data files written for the historical C version of the
  program use this layout and must be read with `--layout variable-major`.

## Running

```bash
linord --observations Obs.txt --variables Var.txt --data Data.txt \
  --min-coefficient 10 --output Results.txt
```

Any missing value is asked for on the standard input. All the options may also come from
a JSON configuration file passed with `--config`. Paths in the file are relative to the
directory of the configuration file:

```json
{
  "observationFile": "Obs.txt",
  "variableFile": "Var.txt",
  "dataFile": "Data.txt",
  "minimumCoefficientOfVariation": 10,
  "outputFile": "Results.txt",
  "dataLayout": "observationMajor"
}
```

Other options:
- `--summary <file or stdout>` also writes the results in JSON format
- `--reference <file>` compares the report with a reference report, and fails if they differ
- `--verbose` turns on debug logging (`RUST_LOG` is also honored)

## Report

```text
Variable: X
Minimum: 1.000000
Maximum: 3.000000
Mean: 2.000000
Median: 2.000000
Standard deviation: 0.816497
Variance: 0.666667
Coefficient of variation (%): 40.824829

Variable: Y
NOTE: Required to remove variable Y due to low level of coefficient of variation
...

RANKING
1. 1.000000 - B
2. 1.000000 - C
3. 0.000000 - A
```

*/
